//! Matching of request paths against the document route template.

use percent_encoding::percent_decode_str;

pub const DOCUMENT_NAME: &str = "documentName";

pub const DEFAULT_TEMPLATE: &str = "/swagger/{documentName}/swagger.json";

/// Literal text surrounding a parameter within a single path segment, like `v-{documentName}.json`.
#[derive(Debug)]
struct Affix {
    param: String,
    prefix: String,
    suffix: String,
}

impl Affix {
    fn parse(segment: &str) -> Option<Self> {
        let start = segment.find('{')?;
        let end = segment.rfind('}')?;
        if end < start || (start == 0 && end + 1 == segment.len()) {
            return None;
        }
        let param = &segment[start + 1..end];
        if param.is_empty() || param.contains(['{', '}', '*']) {
            return None;
        }
        Some(Self {
            param: param.to_string(),
            prefix: segment[..start].to_string(),
            suffix: segment[end + 1..].to_string(),
        })
    }

    fn strip<'v>(&self, value: &'v str) -> Option<&'v str> {
        value
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
            .filter(|inner| !inner.is_empty())
    }
}

#[derive(Debug)]
pub(crate) struct RouteTemplate {
    router: matchit::Router<()>,
    affixes: Vec<Affix>,
    template: String,
}

impl RouteTemplate {
    pub(crate) fn parse(template: &str) -> Result<Self, matchit::InsertError> {
        let template = if template.starts_with('/') {
            template.to_string()
        } else {
            format!("/{template}")
        };
        if !template.contains(&format!("{{{DOCUMENT_NAME}}}")) {
            tracing::warn!(
                "route template {template:?} has no {{{DOCUMENT_NAME}}} segment, no document will be served"
            );
        }
        // the router only knows whole segment parameters, the surrounding text is checked on match
        let mut affixes = Vec::new();
        let route = template
            .split('/')
            .map(|segment| match Affix::parse(segment) {
                Some(affix) => {
                    let param = format!("{{{}}}", affix.param);
                    affixes.push(affix);
                    param
                }
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/");
        let mut router = matchit::Router::new();
        router.insert(route, ())?;
        Ok(Self {
            router,
            affixes,
            template,
        })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.template
    }

    /// Name of the document requested by the path, if it matches the template.
    pub(crate) fn document_name(&self, path: &str) -> Option<String> {
        let found = self.router.at(path).ok()?;
        let mut name = found.params.get(DOCUMENT_NAME)?;
        for affix in self.affixes.iter() {
            let inner = affix.strip(found.params.get(affix.param.as_str())?)?;
            if affix.param == DOCUMENT_NAME {
                name = inner;
            }
        }
        Some(percent_decode_str(name).decode_utf8_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteTemplate, DEFAULT_TEMPLATE};

    #[test]
    fn should_extract_document_name() {
        let template = RouteTemplate::parse(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(
            template.document_name("/swagger/v1/swagger.json").as_deref(),
            Some("v1")
        );
    }

    #[test]
    fn should_not_match_other_paths() {
        let template = RouteTemplate::parse(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(template.document_name("/swagger/v1/swagger.yaml"), None);
        assert_eq!(template.document_name("/swagger/v1"), None);
        assert_eq!(template.document_name("/swagger/v1/other/swagger.json"), None);
        assert_eq!(template.document_name("/pets"), None);
    }

    #[test]
    fn should_prepend_missing_slash() {
        let template = RouteTemplate::parse("docs/{documentName}/api.json").unwrap();
        assert_eq!(template.as_str(), "/docs/{documentName}/api.json");
        assert_eq!(
            template.document_name("/docs/admin/api.json").as_deref(),
            Some("admin")
        );
    }

    #[test]
    fn should_match_name_sharing_segment_with_text() {
        let template = RouteTemplate::parse("/swagger/{documentName}.json").unwrap();
        assert_eq!(template.as_str(), "/swagger/{documentName}.json");
        assert_eq!(
            template.document_name("/swagger/v1.json").as_deref(),
            Some("v1")
        );
        assert_eq!(template.document_name("/swagger/v1.yaml"), None);
        assert_eq!(template.document_name("/swagger/.json"), None);

        let template = RouteTemplate::parse("/docs/api-{documentName}.json").unwrap();
        assert_eq!(
            template.document_name("/docs/api-admin.json").as_deref(),
            Some("admin")
        );
        assert_eq!(template.document_name("/docs/admin.json"), None);
    }

    #[test]
    fn should_decode_document_name() {
        let template = RouteTemplate::parse(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(
            template.document_name("/swagger/my%20api/swagger.json").as_deref(),
            Some("my api")
        );
        let template = RouteTemplate::parse("/swagger/{documentName}.json").unwrap();
        assert_eq!(
            template.document_name("/swagger/caf%C3%A9.json").as_deref(),
            Some("café")
        );
    }

    #[test]
    fn should_never_match_without_document_segment() {
        let template = RouteTemplate::parse("/docs/{name}/api.json").unwrap();
        assert_eq!(template.document_name("/docs/v1/api.json"), None);
    }

    #[test]
    fn should_reject_invalid_template() {
        assert!(RouteTemplate::parse("/docs/{documentName/api.json").is_err());
    }
}
