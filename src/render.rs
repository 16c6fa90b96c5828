//! # Template Rendering
//!
//! Build files and pipeline definitions are rendered with Handlebars. One
//! `Renderer` is built per run and shared by every library; it carries the
//! `in_range` helper so templates can switch build steps on version ranges:
//!
//! ```handlebars
//! {{#if (in_range version "1.0.2" "1.1.1")}}
//! RUN ./config no-shared
//! {{else}}
//! RUN ./Configure linux-x86_64
//! {{/if}}
//! ```
//!
//! `null` leaves a bound open: `(in_range version null "1.1.0")` is true for
//! every version up to and including `1.1.0`.
//!
//! The registry runs in strict mode. Referencing a variable that the context
//! does not define is an error instead of silently rendering an empty string,
//! since an empty build argument produces a broken Dockerfile that only fails
//! once CI tries to build it. HTML escaping is disabled: the outputs are
//! Dockerfiles and YAML.

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, JsonValue, RenderContext, RenderError,
    RenderErrorReason, ScopedJson,
};
use serde::Serialize;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::version::{in_range, Version, VersionRecord};

/// Context for rendering one version's build file.
#[derive(Debug, Clone, Serialize)]
pub struct BuildContext<'a> {
    pub library_name: &'a str,
    pub upstream_url: &'a str,
    pub tag: &'a str,
    pub version: &'a Version,
}

/// Context for rendering a library's aggregate pipeline definition.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineContext<'a> {
    pub library_name: &'a str,
    /// Sorted ascending by version.
    pub versions: &'a [VersionRecord],
    pub settings: &'a Settings,
}

/// Handlebars registry with the version helpers installed.
pub struct Renderer {
    registry: Handlebars<'static>,
    /// Library the templates are currently rendered for, used in errors.
    library: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("in_range", Box::new(InRangeHelper));
        Self {
            registry,
            library: String::new(),
        }
    }

    /// Set the library name reported in template errors.
    pub fn for_library(&mut self, library: &str) -> &mut Self {
        self.library = library.to_string();
        self
    }

    /// Compile a template under `name`, replacing any earlier one.
    pub fn register(&mut self, name: &str, text: &str) -> Result<()> {
        self.registry
            .register_template_string(name, text)
            .map_err(|e| self.error(name, e.to_string()))
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        self.registry
            .render(name, context)
            .map_err(|e| self.error(name, e.to_string()))
    }

    /// Compile and render a template in one step.
    pub fn render_str<T: Serialize>(&self, text: &str, context: &T) -> Result<String> {
        self.registry
            .render_template(text, context)
            .map_err(|e| self.error("<inline>", e.to_string()))
    }

    fn error(&self, template: &str, message: String) -> Error {
        Error::Template {
            library: self.library.clone(),
            template: template.to_string(),
            message,
        }
    }
}

/// `in_range version left right`, each bound a version string or `null`.
struct InRangeHelper;

impl HelperDef for InRangeHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> std::result::Result<ScopedJson<'rc>, RenderError> {
        let param = |idx: usize| {
            h.param(idx)
                .map(|p| p.value())
                .ok_or(RenderErrorReason::ParamNotFoundForIndex("in_range", idx))
        };

        let version = helper_version(param(0)?)?.ok_or_else(|| {
            RenderErrorReason::Other("in_range: the version to test must not be null".to_string())
        })?;
        let left = helper_version(param(1)?)?;
        let right = helper_version(param(2)?)?;

        Ok(ScopedJson::Derived(JsonValue::Bool(in_range(
            &version,
            left.as_ref(),
            right.as_ref(),
        ))))
    }
}

/// Read a helper argument as a version; `null` means unbounded.
fn helper_version(value: &JsonValue) -> std::result::Result<Option<Version>, RenderErrorReason> {
    let text = match value {
        JsonValue::Null => return Ok(None),
        JsonValue::String(s) => s.clone(),
        other => {
            return Err(RenderErrorReason::Other(format!(
                "in_range: expected a version string or null, got {}",
                other
            )))
        }
    };
    Version::parse(&text)
        .map(Some)
        .map_err(|e| RenderErrorReason::Other(format!("in_range: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn build_context<'a>(version: &'a Version) -> BuildContext<'a> {
        BuildContext {
            library_name: "mbedtls",
            upstream_url: "https://github.com/ARMmbed/mbedtls.git",
            tag: "v1.5.0",
            version,
        }
    }

    const RANGE_TEMPLATE: &str =
        r#"{{#if (in_range version "1.0.0" "2.0.0")}}inside{{else}}outside{{/if}}"#;

    #[test]
    fn test_in_range_branch_true_inside() {
        let renderer = Renderer::new();
        let version = v("1.5.0");
        let out = renderer.render_str(RANGE_TEMPLATE, &build_context(&version)).unwrap();
        assert_eq!(out, "inside");
    }

    #[test]
    fn test_in_range_branch_false_outside() {
        let renderer = Renderer::new();
        let version = v("2.5.0");
        let out = renderer.render_str(RANGE_TEMPLATE, &build_context(&version)).unwrap();
        assert_eq!(out, "outside");
    }

    #[test]
    fn test_in_range_null_bounds() {
        let renderer = Renderer::new();
        let template = r#"{{#if (in_range version null "1.1.0")}}old{{/if}}{{#if (in_range version "1.1.1" null)}}new{{/if}}"#;

        let old = v("1.0.2");
        assert_eq!(renderer.render_str(template, &build_context(&old)).unwrap(), "old");
        let new = v("3.0");
        assert_eq!(renderer.render_str(template, &build_context(&new)).unwrap(), "new");
    }

    #[test]
    fn test_in_range_renders_boolean_inline() {
        let renderer = Renderer::new();
        let version = v("1.0.0");
        let out = renderer
            .render_str(r#"{{in_range version "1.0" "1.0"}}"#, &build_context(&version))
            .unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn test_in_range_rejects_unparseable_bound() {
        let renderer = Renderer::new();
        let version = v("1.0.0");
        let err = renderer
            .render_str(r#"{{in_range version "one" null}}"#, &build_context(&version))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid version 'one'"));
    }

    #[test]
    fn test_in_range_rejects_numeric_bound() {
        // `1.10` as a JSON number would read back as `1.1`
        let renderer = Renderer::new();
        let version = v("1.5");
        let err = renderer
            .render_str("{{in_range version 1.10 null}}", &build_context(&version))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("expected a version string or null"));

        let out = renderer
            .render_str(r#"{{in_range version "1.10" null}}"#, &build_context(&version))
            .unwrap();
        assert_eq!(out, "false");
    }

    #[test]
    fn test_in_range_missing_argument() {
        let renderer = Renderer::new();
        let version = v("1.0.0");
        let result = renderer.render_str(r#"{{in_range version "1.0"}}"#, &build_context(&version));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_context_variables() {
        let renderer = Renderer::new();
        let version = v("1.5.0");
        let out = renderer
            .render_str(
                "{{library_name}} {{upstream_url}} {{tag}} {{version}}",
                &build_context(&version),
            )
            .unwrap();
        assert_eq!(out, "mbedtls https://github.com/ARMmbed/mbedtls.git v1.5.0 1.5.0");
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let mut renderer = Renderer::new();
        renderer.for_library("mbedtls");
        let version = v("1.5.0");
        let err = renderer
            .render_str("FROM {{base_image}}", &build_context(&version))
            .unwrap_err();
        match err {
            Error::Template { library, template, .. } => {
                assert_eq!(library, "mbedtls");
                assert_eq!(template, "<inline>");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_surfaces_at_register() {
        let mut renderer = Renderer::new();
        renderer.for_library("botan");
        let err = renderer.register("Dockerfile.hbs", "{{#if version}}unterminated").unwrap_err();
        assert!(err.to_string().contains("Dockerfile.hbs"));
        assert!(err.to_string().contains("botan"));
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = Renderer::new();
        let out = renderer
            .render_str("{{cmd}}", &json!({ "cmd": "make && make test > /dev/null" }))
            .unwrap();
        assert_eq!(out, "make && make test > /dev/null");
    }

    #[test]
    fn test_pipeline_context_lists_versions_in_order() {
        let mut renderer = Renderer::new();
        renderer
            .register(
                "pipeline",
                "{{#each versions}}{{version}}({{tag}}){{#unless @last}},{{/unless}}{{/each}} timeout={{settings.timeout}}",
            )
            .unwrap();

        let versions = vec![
            VersionRecord::new("v1.2.0", v("1.2.0")),
            VersionRecord::new("v1.10.0", v("1.10.0")),
        ];
        let mut settings = Settings::new();
        settings.insert("timeout".to_string(), json!(60));
        let context = PipelineContext {
            library_name: "demo",
            versions: &versions,
            settings: &settings,
        };

        let out = renderer.render("pipeline", &context).unwrap();
        assert_eq!(out, "1.2.0(v1.2.0),1.10.0(v1.10.0) timeout=60");
    }

    #[test]
    fn test_pipeline_with_no_versions() {
        let renderer = Renderer::new();
        let settings = Settings::new();
        let context = PipelineContext {
            library_name: "demo",
            versions: &[],
            settings: &settings,
        };
        let out = renderer
            .render_str("name: {{library_name}}\n{{#each versions}}- {{version}}\n{{/each}}", &context)
            .unwrap();
        assert_eq!(out, "name: demo\n");
    }

    #[test]
    fn test_pipeline_snapshot() {
        let renderer = Renderer::new();
        let versions = vec![
            VersionRecord::new("OpenSSL_1_1_1", v("1.1.1")),
            VersionRecord::new("openssl-3.0.7", v("3.0.7")),
        ];
        let settings = Settings::new();
        let context = PipelineContext {
            library_name: "openssl",
            versions: &versions,
            settings: &settings,
        };
        let template = "kind: pipeline\nname: {{library_name}}\nsteps:\n{{#each versions}}  - name: {{version}}\n    image: plugins/docker\n    settings:\n      tags: {{version}}\n      dockerfile: {{../library_name}}/dockerfiles/{{version}}/Dockerfile\n{{/each}}";
        let out = renderer.render_str(template, &context).unwrap();
        insta::assert_snapshot!(out, @r"
kind: pipeline
name: openssl
steps:
  - name: 1.1.1
    image: plugins/docker
    settings:
      tags: 1.1.1
      dockerfile: openssl/dockerfiles/1.1.1/Dockerfile
  - name: 3.0.7
    image: plugins/docker
    settings:
      tags: 3.0.7
      dockerfile: openssl/dockerfiles/3.0.7/Dockerfile
");
    }
}
