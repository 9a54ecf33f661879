//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted. [`Response::set_status`]
//! takes either a `Status` or a bare `u16`:
//!
//! ```rust
//! use afterburner::{Response, Status};
//!
//! let mut res = Response::new();
//! res.set_status(Status::Created);
//! assert_eq!(res.status(), 201);
//!
//! res.set_status(418u16);
//! assert_eq!(res.status(), 418);
//! ```
//!
//! [`Response::set_status`]: crate::Response::set_status

use std::fmt;

macro_rules! statuses {
    ($($variant:ident = $code:literal, $reason:literal;)+) => {
        /// The HTTP status codes handlers reach for most often.
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum Status {
            $($variant,)+
        }

        impl Status {
            /// Numeric status code.
            pub fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            /// Canonical reason phrase (e.g. `"Not Found"`).
            pub fn reason(self) -> &'static str {
                match self {
                    $(Self::$variant => $reason,)+
                }
            }

            /// Looks up the variant for a numeric code.
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

statuses! {
    // 2xx
    Ok                  = 200, "OK";
    Created             = 201, "Created";
    Accepted            = 202, "Accepted";
    NoContent           = 204, "No Content";
    // 3xx
    MovedPermanently    = 301, "Moved Permanently";
    Found               = 302, "Found";
    SeeOther            = 303, "See Other";
    NotModified         = 304, "Not Modified";
    TemporaryRedirect   = 307, "Temporary Redirect";
    PermanentRedirect   = 308, "Permanent Redirect";
    // 4xx
    BadRequest          = 400, "Bad Request";
    Unauthorized        = 401, "Unauthorized";
    Forbidden           = 403, "Forbidden";
    NotFound            = 404, "Not Found";
    MethodNotAllowed    = 405, "Method Not Allowed";
    NotAcceptable       = 406, "Not Acceptable";
    Conflict            = 409, "Conflict";
    Gone                = 410, "Gone";
    UnsupportedMediaType = 415, "Unsupported Media Type";
    ImATeapot           = 418, "I'm a Teapot";
    UnprocessableContent = 422, "Unprocessable Content";
    TooManyRequests     = 429, "Too Many Requests";
    // 5xx
    InternalServerError = 500, "Internal Server Error";
    NotImplemented      = 501, "Not Implemented";
    BadGateway          = 502, "Bad Gateway";
    ServiceUnavailable  = 503, "Service Unavailable";
    GatewayTimeout      = 504, "Gateway Timeout";
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.code()
    }
}

/// `404 Not Found`
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}
