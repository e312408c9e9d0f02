use std::borrow::Cow;
use std::fmt;

/// A structural element locator. The UI has no stable API contract, so every
/// lookup goes through one of these two query languages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(Cow<'static, str>),
    XPath(Cow<'static, str>),
}

impl Locator {
    pub fn css(selector: impl Into<Cow<'static, str>>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<Cow<'static, str>>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::XPath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::XPath(s) => write!(f, "xpath `{}`", s),
        }
    }
}
