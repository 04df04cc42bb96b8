//! Shared Kernel - 校验原语
//!
//! 所有值对象都通过这里的声明式 schema 校验原始输入:
//! - `validate_with_schema`: 单值校验，成功返回规范化后的值，失败由调用方提供的构造器生成领域错误
//! - `validate_each`: 集合逐项校验，从左到右，遇到第一个失败立即返回

use regex::Regex;
use url::Url;

/// 声明式校验规则
///
/// `parse` 只报告问题，不决定错误类型；错误类型由 `validate_with_schema` 的调用方决定。
pub trait Schema<I: ?Sized> {
    type Output;

    fn parse(&self, value: &I) -> Result<Self::Output, Vec<String>>;
}

/// 用 schema 校验原始值，失败时用 `error` 构造领域错误
pub fn validate_with_schema<I, S, E>(
    schema: &S,
    value: &I,
    error: impl FnOnce(String) -> E,
) -> Result<S::Output, E>
where
    I: ?Sized,
    S: Schema<I>,
{
    schema.parse(value).map_err(|issues| error(issues.join("; ")))
}

/// 集合逐项校验
///
/// 成功返回 `()`，不产生新集合，原集合的顺序和内容保持不变。
pub fn validate_each<T, E>(
    items: &[T],
    mut validate: impl FnMut(&T) -> Result<(), E>,
) -> Result<(), E> {
    items.iter().try_for_each(|item| validate(item))
}

type Refinement = (fn(&str) -> bool, &'static str);

/// 字符串 schema
#[derive(Clone, Default)]
pub struct TextSchema {
    trim: bool,
    min_chars: Option<usize>,
    max_chars: Option<usize>,
    pattern: Option<&'static Regex>,
    absolute_url: bool,
    refinements: Vec<Refinement>,
}

impl TextSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验前去掉首尾空白，输出也是去空白后的值
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn min(mut self, chars: usize) -> Self {
        self.min_chars = Some(chars);
        self
    }

    pub fn max(mut self, chars: usize) -> Self {
        self.max_chars = Some(chars);
        self
    }

    pub fn pattern(mut self, pattern: &'static Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// 要求是带 scheme 的绝对 URL
    pub fn url(mut self) -> Self {
        self.absolute_url = true;
        self
    }

    pub fn refine(mut self, check: fn(&str) -> bool, message: &'static str) -> Self {
        self.refinements.push((check, message));
        self
    }
}

impl Schema<str> for TextSchema {
    type Output = String;

    fn parse(&self, value: &str) -> Result<String, Vec<String>> {
        let value = if self.trim { value.trim() } else { value };
        let length = value.chars().count();
        let mut issues = Vec::new();

        if let Some(min) = self.min_chars {
            if length < min {
                issues.push(format!("长度不能少于 {} 个字符", min));
            }
        }
        if let Some(max) = self.max_chars {
            if length > max {
                issues.push(format!("长度不能超过 {} 个字符", max));
            }
        }
        if let Some(pattern) = self.pattern {
            if !pattern.is_match(value) {
                issues.push("包含不允许的字符".to_string());
            }
        }
        if self.absolute_url {
            if let Err(e) = Url::parse(value) {
                issues.push(format!("不是有效的 URL ({})", e));
            }
        }
        for (check, message) in &self.refinements {
            if !check(value) {
                issues.push((*message).to_string());
            }
        }

        if issues.is_empty() {
            Ok(value.to_string())
        } else {
            Err(issues)
        }
    }
}

/// 整数 schema
///
/// 输入是传输层给出的数字（可能带小数），非整数、NaN、无穷大一律拒绝。
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerSchema {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerSchema {
    pub const fn new() -> Self {
        Self { min: None, max: None }
    }

    pub const fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Schema<f64> for IntegerSchema {
    type Output = i64;

    fn parse(&self, value: &f64) -> Result<i64, Vec<String>> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(vec![format!("必须是整数，实际为 {}", value)]);
        }
        if *value < i64::MIN as f64 || *value > i64::MAX as f64 {
            return Err(vec![format!("超出整数范围: {}", value)]);
        }

        let number = *value as i64;
        let mut issues = Vec::new();
        if let Some(min) = self.min {
            if number < min {
                issues.push(format!("不能小于 {}", min));
            }
        }
        if let Some(max) = self.max {
            if number > max {
                issues.push(format!("不能大于 {}", max));
            }
        }

        if issues.is_empty() {
            Ok(number)
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+$").unwrap());

    #[derive(Debug, PartialEq)]
    struct TestError(String);

    #[test]
    fn test_text_schema_returns_normalized_value() {
        let schema = TextSchema::new().trim().min(1);
        let value = validate_with_schema(&schema, "  hello ", TestError).unwrap();
        assert_eq!(value, "hello");
    }

    #[test]
    fn test_text_schema_collects_issues_into_one_error() {
        let schema = TextSchema::new().min(1).pattern(&LETTERS);
        let err = validate_with_schema(&schema, "", TestError).unwrap_err();
        assert!(err.0.contains("长度不能少于 1"));
        assert!(err.0.contains("包含不允许的字符"));
    }

    #[test]
    fn test_text_schema_counts_chars_not_bytes() {
        let schema = TextSchema::new().max(2);
        assert!(validate_with_schema(&schema, "书名", TestError).is_ok());
        assert!(validate_with_schema(&schema, "书名长", TestError).is_err());
    }

    #[test]
    fn test_url_schema_requires_absolute_url() {
        let schema = TextSchema::new().url();
        assert!(validate_with_schema(&schema, "https://example.com/a.pdf", TestError).is_ok());
        assert!(validate_with_schema(&schema, "not-a-url", TestError).is_err());
        assert!(validate_with_schema(&schema, "/relative/path", TestError).is_err());
    }

    #[test]
    fn test_refinement_message_is_reported() {
        let schema = TextSchema::new().refine(|s| s.starts_with('x'), "必须以 x 开头");
        let err = validate_with_schema(&schema, "abc", TestError).unwrap_err();
        assert_eq!(err, TestError("必须以 x 开头".to_string()));
    }

    #[test]
    fn test_integer_schema_rejects_fractions_and_out_of_range() {
        let schema = IntegerSchema::new().min(1450).max(3000);
        assert_eq!(validate_with_schema(&schema, &2023.0, TestError), Ok(2023));
        assert!(validate_with_schema(&schema, &2023.5, TestError).is_err());
        assert!(validate_with_schema(&schema, &-1.0, TestError).is_err());
        assert!(validate_with_schema(&schema, &3001.0, TestError).is_err());
        assert!(validate_with_schema(&schema, &f64::NAN, TestError).is_err());
    }

    #[test]
    fn test_validate_each_stops_at_first_failure() {
        let items = ["a", "", "b", ""];
        let mut visited = Vec::new();
        let result = validate_each(&items, |item| {
            visited.push(*item);
            if item.is_empty() {
                Err(TestError(format!("empty after {}", visited.len())))
            } else {
                Ok(())
            }
        });

        assert_eq!(result, Err(TestError("empty after 2".to_string())));
        assert_eq!(visited, vec!["a", ""]);
    }

    #[test]
    fn test_validate_each_accepts_empty_collection() {
        let items: [&str; 0] = [];
        assert_eq!(validate_each(&items, |_| Err(TestError("x".into()))), Ok(()));
    }
}
