pub mod scroll;
#[cfg(test)]
pub mod test_utils;
pub mod url;
