//! Ordered precedence tiers.
//!
//! Every merged field of a view model is chosen by walking a list of named,
//! pure selector functions and taking the first that yields a value. Keeping
//! the lists as data makes the precedence rules explicit and lets each one be
//! tested without any I/O.

/// One named source for a value.
///
/// # Examples
///
/// ```
/// use wayfare_resolver::tier::{Tier, first_tier};
///
/// fn curated(input: &(Option<&str>, &str)) -> Option<String> {
///     input.0.map(str::to_owned)
/// }
///
/// fn generic(input: &(Option<&str>, &str)) -> Option<String> {
///     Some(format!("Explore {}.", input.1))
/// }
///
/// let tiers = [Tier::new("static", curated), Tier::new("generic", generic)];
/// let picked = first_tier("description", &(None, "Peru"), &tiers);
/// assert_eq!(picked.as_deref(), Some("Explore Peru."));
/// ```
pub struct Tier<I, T> {
    /// Label used in debug logs.
    pub name: &'static str,
    /// Pure selector; `None` defers to the next tier.
    pub select: fn(&I) -> Option<T>,
}

impl<I, T> Tier<I, T> {
    /// Pair a label with a selector.
    pub const fn new(name: &'static str, select: fn(&I) -> Option<T>) -> Self {
        Self { name, select }
    }
}

impl<I, T> std::fmt::Debug for Tier<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tier").field("name", &self.name).finish()
    }
}

/// Return the value of the first tier that yields one.
pub fn first_tier<I, T>(field: &str, input: &I, tiers: &[Tier<I, T>]) -> Option<T> {
    tiers.iter().find_map(|tier| {
        let value = (tier.select)(input)?;
        log::debug!("{field}: using {} tier", tier.name);
        Some(value)
    })
}

/// Like [`first_tier`], falling back to `last` when every tier declines.
pub fn first_tier_or<I, T>(
    field: &str,
    input: &I,
    tiers: &[Tier<I, T>],
    last: fn(&I) -> T,
) -> T {
    first_tier(field, input, tiers).unwrap_or_else(|| {
        log::debug!("{field}: using fallback");
        last(input)
    })
}

/// The value when it is not blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// The list when it has entries.
pub(crate) fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    (!items.is_empty()).then(|| items.to_vec())
}
