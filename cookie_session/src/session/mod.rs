mod errors;
mod manager;

#[cfg(test)]
mod test_utils;

pub use errors::SessionError;
pub use manager::SessionManager;
