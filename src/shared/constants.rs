/// Cookie carrying the one-shot flash message across a redirect
pub const FLASH_COOKIE: &str = "flash";

