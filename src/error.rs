use std::fmt::{Debug, Display};
pub struct OrientateError(pub String);

impl Display for OrientateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for OrientateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OrientateError").field(&self.0).finish()
    }
}

impl std::error::Error for OrientateError {}

#[macro_export]
macro_rules! orientate_err {
    ($msg:expr) => {
        $crate::error::OrientateError(format!(
            "orientate: {} @ {}:{}:{}",
            $msg,
            file!(),
            line!(),
            column!()
        ))
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::orientate_err!(format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! orientate_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::orientate_err!(err));
            }
        }
    };
}
