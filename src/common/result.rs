use crate::common::error::RelgitError;

/// relgit全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use relgit::common::result::RelgitResult;
/// use relgit::common::error::RelgitError;
///
/// fn example_function() -> RelgitResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> RelgitResult<()> {
///     Err(RelgitError::internal_error("Something went wrong"))
/// }
/// ```
pub type RelgitResult<T> = Result<T, RelgitError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// OptionをRelgitResultに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use relgit::common::result::{RelgitResult, OptionExt};
    /// use relgit::common::error::RelgitError;
    ///
    /// let none_value: Option<String> = None;
    /// let result: RelgitResult<String> =
    ///     none_value.ok_or_relgit(RelgitError::internal_error("Value not found"));
    /// assert!(result.is_err());
    /// ```
    fn ok_or_relgit(self, error: RelgitError) -> RelgitResult<T>;

    /// Optionをエラーメッセージ付きでRelgitResultに変換する
    fn ok_or_internal_error(self, message: impl Into<String>) -> RelgitResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_relgit(self, error: RelgitError) -> RelgitResult<T> {
        self.ok_or(error)
    }

    fn ok_or_internal_error(self, message: impl Into<String>) -> RelgitResult<T> {
        self.ok_or_else(|| RelgitError::internal_error(message))
    }
}
