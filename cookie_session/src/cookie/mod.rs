mod ambient;
mod options;
mod request;
mod source;

pub use ambient::{AmbientCookieStore, CookieScope, with_cookie_scope};
pub use options::{CookieOptions, SameSite};
pub use request::{RequestCookies, cookie_from_headers};
pub use source::{CookieSource, CookieStore};

pub(crate) use source::StoreSource;
