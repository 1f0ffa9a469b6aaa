use crate::filters;
use crate::layout;
use crate::views::{StaticViewRegistry, ViewResolver};
use easel_core::EaselError;
use easel_core::plugin::{MarkupLanguage, Plugin};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Returned when a plugin has neither inline markup nor a view reference.
pub const PLACEHOLDER: &str = "<p>No render markup yet defined for this plugin.</p>";

/// Target display size for one render.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SizeVariant {
    #[default]
    Full,
    HalfHorizontal,
    HalfVertical,
    Quadrant,
}

impl SizeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeVariant::Full => "full",
            SizeVariant::HalfHorizontal => "half_horizontal",
            SizeVariant::HalfVertical => "half_vertical",
            SizeVariant::Quadrant => "quadrant",
        }
    }
}

/// One rendering strategy: template source + bindings in, markup out.
///
/// Closed set — the markup language enum selects the implementation, so
/// there is no runtime lookup to poison and nothing shared between
/// concurrent renders.
trait MarkupRenderer {
    fn render(&self, source: &str, size: SizeVariant, data: &Value) -> Result<String, EaselError>;
}

struct LiquidRenderer;
struct HtmlRenderer;

fn renderer_for(language: MarkupLanguage) -> &'static dyn MarkupRenderer {
    match language {
        MarkupLanguage::Liquid => &LiquidRenderer,
        MarkupLanguage::Html => &HtmlRenderer,
    }
}

impl MarkupRenderer for LiquidRenderer {
    fn render(&self, source: &str, size: SizeVariant, data: &Value) -> Result<String, EaselError> {
        // Fresh environment per render; the filter set is fixed.
        let parser = liquid::ParserBuilder::with_stdlib()
            .filter(filters::NumberWithDelimiter)
            .filter(filters::NumberToCurrency)
            .filter(filters::Json)
            .filter(filters::Keys)
            .filter(filters::Pluralize)
            .filter(filters::Titleize)
            .filter(filters::UniqueId)
            .filter(filters::LDate)
            .build()
            .map_err(template_error)?;

        let template = parser.parse(source).map_err(template_error)?;
        let globals = liquid::model::to_object(&serde_json::json!({
            "size": size.as_str(),
            "data": data,
        }))
        .map_err(template_error)?;
        template.render(&globals).map_err(template_error)
    }
}

impl MarkupRenderer for HtmlRenderer {
    fn render(&self, source: &str, size: SizeVariant, data: &Value) -> Result<String, EaselError> {
        let env = minijinja::Environment::new();
        env.render_str(
            source,
            minijinja::context! { size => size.as_str(), data => data },
        )
        .map_err(|e| EaselError::TemplateExecution(e.to_string()))
    }
}

fn template_error(err: liquid::Error) -> EaselError {
    EaselError::TemplateExecution(err.to_string())
}

/// Renders plugins to display markup.
///
/// Rendering is read-only: it works on whatever payload snapshot the
/// caller passes in and never mutates plugin state.
pub struct Renderer {
    views: Arc<dyn ViewResolver>,
}

impl Renderer {
    pub fn new(views: Arc<dyn ViewResolver>) -> Self {
        Self { views }
    }

    /// Render one plugin.
    ///
    /// Inline markup wins over a view reference; with neither configured
    /// the fixed placeholder is returned as-is (an execution error, by
    /// contrast, always propagates — no silent fallback content).
    pub fn render(
        &self,
        plugin: &Plugin,
        size: SizeVariant,
        standalone: bool,
    ) -> Result<String, EaselError> {
        let data = plugin.data_payload.clone().unwrap_or(Value::Null);

        let fragment = if let Some(source) = plugin.render_markup.as_deref() {
            debug!(plugin = %plugin.id, language = plugin.markup_language.as_str(), "Rendering inline markup");
            renderer_for(plugin.markup_language).render(source, size, &data)?
        } else if let Some(reference) = plugin.render_markup_view.as_deref() {
            debug!(plugin = %plugin.id, view = reference, "Rendering view reference");
            let source = self.views.resolve(reference).ok_or_else(|| {
                EaselError::TemplateExecution(format!("Unknown view reference: {reference}"))
            })?;
            HtmlRenderer.render(&source, size, &data)?
        } else {
            return Ok(PLACEHOLDER.to_string());
        };

        if standalone {
            layout::wrap_standalone(&fragment)
        } else {
            Ok(fragment)
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Arc::new(StaticViewRegistry::new()))
    }
}
