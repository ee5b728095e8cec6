//! Pluralization rules and the built-in `pluralize` helper
//!
//! Templates call `${pluralize(count, 'apple', 'apples')}`; the helper picks
//! the form by the short language code of the rendering context. Forms may
//! also be passed as a single list argument.

use crate::template::RenderScope;
use crate::value::{Helper, Value};

/// Name under which the helper is bound into every context
pub const PLURALIZE_HELPER: &str = "pluralize";

/// Plural rule families by number of forms and how counts map onto them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// 1 = first form, everything else = second (en, de, es, it, nl, ...)
    OneOther,
    /// 0 and 1 = first form, everything else = second (fr, pt)
    ZeroOne,
    /// One form for all counts (ja, zh, ko, vi, th, id)
    Single,
    /// one / few / many (ru, uk, be, sr, hr, bs)
    EastSlavic,
    /// one / few / many with 1 only as singular (pl)
    Polish,
    /// one / few (2-4) / other (cs, sk)
    Czech,
}

impl PluralRule {
    /// Rule for a short language code
    pub fn for_language(short_language: &str) -> Self {
        match short_language {
            "fr" | "pt" => Self::ZeroOne,
            "ja" | "zh" | "ko" | "vi" | "th" | "id" => Self::Single,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::EastSlavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            _ => Self::OneOther,
        }
    }

    /// Number of forms a template is expected to pass
    pub fn form_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOne => 2,
            Self::EastSlavic | Self::Polish | Self::Czech => 3,
        }
    }

    /// Index of the form to use for `count`.
    ///
    /// Fractional counts take the last form.
    pub fn form_index(&self, count: f64) -> usize {
        if *self == Self::Single {
            return 0;
        }
        if count.fract() != 0.0 || !count.is_finite() {
            return self.form_count() - 1;
        }

        let n = count.abs() as u64;
        let (rem10, rem100) = (n % 10, n % 100);
        let few = (2..=4).contains(&rem10) && !(12..=14).contains(&rem100);

        match self {
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOne => usize::from(n > 1),
            Self::EastSlavic if rem10 == 1 && rem100 != 11 => 0,
            Self::EastSlavic if few => 1,
            Self::EastSlavic => 2,
            Self::Polish if n == 1 => 0,
            Self::Polish if few => 1,
            Self::Polish => 2,
            Self::Czech if n == 1 => 0,
            Self::Czech if (2..=4).contains(&n) => 1,
            Self::Czech => 2,
            Self::Single => 0,
        }
    }
}

/// Pick the plural form of `count` for a short language code.
///
/// When fewer forms are given than the rule expects, the last one is used.
pub fn pluralize<'f>(short_language: &str, count: f64, forms: &[&'f str]) -> Option<&'f str> {
    let index = PluralRule::for_language(short_language).form_index(count);
    forms.get(index).or_else(|| forms.last()).copied()
}

/// The `pluralize(count, ...forms)` helper bound into rendering contexts
pub fn pluralize_helper() -> Helper {
    Helper::new(|scope: &RenderScope<'_>, args: &[Value]| {
        let (count, rest) = args
            .split_first()
            .ok_or_else(|| "expects a count and at least one form".to_string())?;
        let count = count
            .as_number()
            .ok_or_else(|| format!("count must be a number, got {}", count.kind()))?;

        let forms: Vec<String> = match rest {
            [Value::List(items)] => items.iter().filter_map(Value::to_text).collect(),
            _ => rest.iter().filter_map(Value::to_text).collect(),
        };
        let forms: Vec<&str> = forms.iter().map(String::as_str).collect();

        pluralize(scope.short_language, count, &forms)
            .map(Value::from)
            .ok_or_else(|| "expects at least one form".to_string())
    })
}
