use super::StatementKind;
use crate::error::ConvertResult;

/// Base trait for statement builders.
pub trait SqlBuilder {
    /// Statement kind.
    fn kind(&self) -> StatementKind;

    /// Build the SQL string without validation.
    fn build_sql(&self) -> String;

    /// Number of fields carried by the statement.
    fn field_count(&self) -> usize;

    /// Validate builder state.
    fn validate(&self) -> ConvertResult<()> {
        Ok(())
    }

    /// Validate, then build.
    fn to_sql(&self) -> ConvertResult<String> {
        self.validate()?;
        Ok(self.build_sql())
    }
}
