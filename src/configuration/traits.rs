use miette::Result;

/// An unvalidated configuration table that can be turned into its final form.
pub trait ResolvableConfiguration {
    type Resolved;

    /// Validates the table and converts it into `Resolved`.
    /// Returns `Err` if the table contains an invalid value.
    fn resolve(self) -> Result<Self::Resolved>;
}


/// Like [`ResolvableConfiguration`], for tables that depend on
/// already resolved parts of the configuration (e.g. the base paths).
pub trait ResolvableConfigurationWithContext {
    type Context;
    type Resolved;

    /// Validates the table against `context` and converts it into `Resolved`.
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved>;
}
