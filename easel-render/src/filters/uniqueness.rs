use liquid_core::Result;
use liquid_core::Runtime;
use liquid_core::{Display_filter, Filter, FilterReflection, ParseFilter};
use liquid_core::{Value, ValueView};

/// `unique_id` — collision-free element ids for repeated fragments.
///
/// Markup rendered several times per screen (one card per quadrant)
/// needs distinct DOM ids: `{{ "chart" | unique_id }}` → `chart-9f3c21ab`.
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "unique_id",
    description = "Appends a random suffix to the input prefix.",
    parsed(UniqueIdFilter)
)]
pub struct UniqueId;

#[derive(Debug, Default, Display_filter)]
#[name = "unique_id"]
struct UniqueIdFilter;

impl Filter for UniqueIdFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> Result<Value> {
        let prefix = input.to_kstr();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Ok(Value::scalar(format!("{}-{}", prefix, &suffix[..8])))
    }
}
