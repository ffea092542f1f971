/// Creates a `FilterRule`.
///
/// - `rule!("Name", "is_null")` builds a rule without a value.
/// - `rule!("Name", "equal", "John")` binds any `Into<Value>`.
#[macro_export]
macro_rules! rule {
    ($field:expr, $op:expr) => {
        $crate::filter::rule::FilterRule::new($field, $op)
    };
    ($field:expr, $op:expr, $val:expr) => {
        $crate::filter::rule::FilterRule::new($field, $op).with_value($val)
    };
}

/// Creates a `FilterGroup` from a combinator, rules, and optional sub-groups.
///
/// ```ignore
/// group!("AND"; rule!("Name", "equal", "John"), rule!("Age", "greater", 25))
/// group!("OR"; rule!("A", "is_null"); group!("AND"; rule!("B", "is_null")))
/// ```
#[macro_export]
macro_rules! group {
    ($cond:expr) => {
        $crate::filter::group::FilterGroup::new($cond)
    };
    ($cond:expr; $($rule:expr),* $(,)?) => {
        $crate::filter::group::FilterGroup {
            condition: $cond.to_string(),
            rules: vec![$($rule),*],
            groups: Vec::new(),
        }
    };
    ($cond:expr; $($rule:expr),* ; $($group:expr),+ $(,)?) => {
        $crate::filter::group::FilterGroup {
            condition: $cond.to_string(),
            rules: vec![$($rule),*],
            groups: vec![$($group),+],
        }
    };
}
