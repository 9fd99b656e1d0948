pub mod steam_locator;
pub mod storage;
