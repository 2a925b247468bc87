// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))
}

/// Elemento raíz `<html>`
pub fn root_element(document: &Document) -> Result<Element, JsValue> {
    document
        .document_element()
        .ok_or_else(|| JsValue::from_str("No document element"))
}

pub fn body(document: &Document) -> Result<HtmlElement, JsValue> {
    document.body().ok_or_else(|| JsValue::from_str("No body"))
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clases (no falla si no estaban)
pub fn remove_classes(element: &Element, classes: &[&str]) -> Result<(), JsValue> {
    let list = element.class_list();
    for class in classes {
        list.remove_1(class)?;
    }
    Ok(())
}

/// Buscar un elemento por selector o crearlo dentro de `<head>`
pub fn find_or_create_in_head(
    document: &Document,
    selector: &str,
    tag: &str,
    attributes: &[(&str, &str)],
) -> Result<Element, JsValue> {
    if let Some(existing) = document.query_selector(selector)? {
        return Ok(existing);
    }

    let element = document.create_element(tag)?;
    for (name, value) in attributes {
        element.set_attribute(name, value)?;
    }
    let head = document.head().ok_or_else(|| JsValue::from_str("No head"))?;
    head.append_child(&element)?;
    Ok(element)
}
