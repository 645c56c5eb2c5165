use std::ffi::OsStr;

/// Error reporting for argument parsing that mimics imagemagick.
/// Use `.display_with_arg()` to properly present this error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgParseErr {
    pub message: Option<String>,
}

impl ArgParseErr {
    pub fn display_with_arg(&self, arg_name: &str, value: &OsStr) -> String {
        // a specific message wins, otherwise the value is echoed back
        let message = match &self.message {
            Some(msg) => msg.clone(),
            None => value.to_string_lossy().into_owned(),
        };
        format!("invalid argument for option `{arg_name}': {message}")
    }

    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_msg(str: impl ToString) -> Self {
        Self {
            message: Some(str.to_string()),
        }
    }
}
