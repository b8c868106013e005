//! Field annotation parsing.
//!
//! Every injectable field carries a textual tag with three mutually exclusive
//! forms:
//!
//! | Tag | Directive | Meaning |
//! |-----|-----------|---------|
//! | `""` | [`Directive::Standard`] | Shared instance, matched by type |
//! | `"private"` | [`Directive::Private`] | Fresh instance, never shared |
//! | anything else | [`Directive::Named`] | The object registered under that exact name |
//!
//! The derive macro turns `#[inject = "..."]` into a call to
//! [`Directive::parse`] when the manifest is built, and the structured
//! shorthands (`#[inject]`, `#[inject(private)]`, `#[inject(name = "...")]`)
//! into the matching variant directly.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

/// The reserved tag marking a private dependency.
pub const PRIVATE_TAG: &str = "private";

/// How a field's dependency is located.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Directive {
    /// One shared instance per concrete type (or a single implementer of a
    /// capability set).
    #[default]
    Standard,
    /// A brand-new instance owned by this field alone.
    Private,
    /// The object registered under this exact name.
    Named(String),
}

impl Directive {
    /// Parses a field tag.
    ///
    /// The tag is taken verbatim: no trimming, so `" private"` names an
    /// object called `" private"`.
    ///
    /// # Example
    ///
    /// ```
    /// use graft_inject::directive::Directive;
    ///
    /// assert_eq!(Directive::parse(""), Directive::Standard);
    /// assert_eq!(Directive::parse("private"), Directive::Private);
    /// assert_eq!(
    ///     Directive::parse("primary db"),
    ///     Directive::Named("primary db".into())
    /// );
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "" => Self::Standard,
            PRIVATE_TAG => Self::Private,
            name => Self::Named(name.to_string()),
        }
    }

    /// Shorthand for `Directive::Named(name.into())`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the requested name for [`Directive::Named`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Standard | Self::Private => None,
        }
    }

    /// Returns `true` for [`Directive::Private`].
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

impl FromStr for Directive {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(tag))
    }
}

/// Renders the directive back to its tag form.
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str(""),
            Self::Private => f.write_str(PRIVATE_TAG),
            Self::Named(name) => f.write_str(name),
        }
    }
}
