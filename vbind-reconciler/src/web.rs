//! Browser element backend (`web` feature)
//!
//! Implements [`Element`] for `web_sys::HtmlElement`. Bindings usually name
//! style properties in camelCase (`fontSize`); the CSSOM property API wants
//! CSS names (`font-size`), so names are converted on the way through.

use crate::element::Element;
use web_sys::HtmlElement;

impl Element for HtmlElement {
    fn set_attribute(&mut self, name: &str, value: &str) {
        if let Err(err) = web_sys::Element::set_attribute(self, name, value) {
            log::warn!("Failed to set attribute `{}`: {:?}", name, err);
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        if let Err(err) = web_sys::Element::remove_attribute(self, name) {
            log::warn!("Failed to remove attribute `{}`: {:?}", name, err);
        }
    }

    fn add_class(&mut self, token: &str) {
        if let Err(err) = self.class_list().add_1(token) {
            log::warn!("Failed to add class `{}`: {:?}", token, err);
        }
    }

    fn remove_class(&mut self, token: &str) {
        if let Err(err) = self.class_list().remove_1(token) {
            log::warn!("Failed to remove class `{}`: {:?}", token, err);
        }
    }

    fn style_property(&self, property: &str) -> Option<String> {
        let value = self
            .style()
            .get_property_value(&css_property_name(property))
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style_property(&mut self, property: &str, value: &str) {
        let style = self.style();
        let name = css_property_name(property);
        let result = if value.is_empty() {
            style.remove_property(&name).map(drop)
        } else {
            style.set_property(&name, value)
        };
        if let Err(err) = result {
            log::warn!("Failed to write style `{}`: {:?}", name, err);
        }
    }
}

/// Convert a camelCase style property name into its CSS form
///
/// Custom properties (`--x`) and names that are already hyphenated pass
/// through unchanged. A leading capital marks a vendor prefix
/// (`WebkitTransform` -> `-webkit-transform`), except for `ms`, which is
/// lowercase (`msTransform` -> `-ms-transform`).
pub fn css_property_name(property: &str) -> String {
    if property.starts_with("--") || property.contains('-') {
        return property.to_string();
    }
    if let Some(rest) = property.strip_prefix("ms") {
        if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            return format!("-ms{}", css_property_name(rest));
        }
    }

    let mut name = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
