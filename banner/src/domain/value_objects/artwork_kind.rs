/// Library art cached per app under `appcache/librarycache`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkKind {
    /// Wide background art, `{app}_library_hero.jpg`
    Hero,
    /// Transparent title logo, `{app}_logo.png`
    Logo,
    /// Library header banner, `{app}_header.jpg` (the generated output)
    Header,
}

impl ArtworkKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtworkKind::Hero => "library_hero",
            ArtworkKind::Logo => "logo",
            ArtworkKind::Header => "header",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArtworkKind::Logo => "png",
            ArtworkKind::Hero | ArtworkKind::Header => "jpg",
        }
    }

    /// Cache file name for an app, e.g. `440_library_hero.jpg`
    pub fn file_name(&self, app_id: u32) -> String {
        format!("{}_{}.{}", app_id, self.suffix(), self.extension())
    }
}

impl std::fmt::Display for ArtworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}
