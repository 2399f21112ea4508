use std::borrow::Cow;
use switcharoo_derive::switcharoo_error;

#[switcharoo_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<()> {
    Err(std::io::Error::other("disk gone")).context("Reading snapshot")
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.to_string().contains("Reading snapshot"));

    let internal: DemoError = "broken invariant".into();
    assert!(matches!(internal, DemoError::Internal { .. }));
}
