mod generate_banners;

pub use generate_banners::GenerateBannersUseCase;
