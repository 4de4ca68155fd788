pub mod constants;
pub mod flash;
pub mod password;
#[cfg(test)]
pub mod test_helpers;
pub mod validation;
pub mod views;
