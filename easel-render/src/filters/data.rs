use liquid_core::Result;
use liquid_core::Runtime;
use liquid_core::{Display_filter, Filter, FilterReflection, ParseFilter};
use liquid_core::{Error, Value, ValueView};

/// `json` — serialize any template value to compact JSON text.
///
/// Handy for dumping payload fragments into `data-*` attributes or
/// inline script blocks: `{{ data.series | json }}`.
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "json",
    description = "Serializes the input to compact JSON.",
    parsed(JsonFilter)
)]
pub struct Json;

#[derive(Debug, Default, Display_filter)]
#[name = "json"]
struct JsonFilter;

impl Filter for JsonFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> Result<Value> {
        let text = serde_json::to_string(&input.to_value())
            .map_err(|e| Error::with_msg(e.to_string()))?;
        Ok(Value::scalar(text))
    }
}

/// `keys` — the key list of an object, for iterating unknown payloads.
///
/// `{% for key in data | keys %}...{% endfor %}`
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "keys",
    description = "Returns the keys of an object as an array.",
    parsed(KeysFilter)
)]
pub struct Keys;

#[derive(Debug, Default, Display_filter)]
#[name = "keys"]
struct KeysFilter;

impl Filter for KeysFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> Result<Value> {
        let obj = input
            .as_object()
            .ok_or_else(|| Error::with_msg("Object expected"))?;
        let keys: Vec<Value> = obj.keys().map(|k| Value::scalar(k.to_string())).collect();
        Ok(Value::Array(keys))
    }
}
