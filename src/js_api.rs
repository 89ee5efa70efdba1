use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::shape::{
    self, calculate_shape_bounds, fix_shape, parse_edge_with_style_changes, validate_morph_shape,
    AttributeSource, Bounds, Edge, MorphValidation, PathCommand, Shape,
};

pub trait ToJsValue {
    fn to_js_value(&self) -> JsValue;
}

fn set_field(obj: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn set_number(obj: &Object, key: &str, value: f64) {
    set_field(obj, key, &JsValue::from_f64(value));
}

fn optional_style(value: Option<u32>) -> JsValue {
    match value {
        Some(v) => JsValue::from(v),
        None => JsValue::NULL,
    }
}

impl ToJsValue for PathCommand {
    fn to_js_value(&self) -> JsValue {
        let obj = Object::new();
        match *self {
            PathCommand::MoveTo { x, y } => {
                set_field(&obj, "type", &"M".into());
                set_number(&obj, "x", x);
                set_number(&obj, "y", y);
            }
            PathCommand::LineTo { x, y } => {
                set_field(&obj, "type", &"L".into());
                set_number(&obj, "x", x);
                set_number(&obj, "y", y);
            }
            PathCommand::QuadraticTo { cx, cy, x, y } => {
                set_field(&obj, "type", &"Q".into());
                set_number(&obj, "cx", cx);
                set_number(&obj, "cy", cy);
                set_number(&obj, "x", x);
                set_number(&obj, "y", y);
            }
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } => {
                set_field(&obj, "type", &"C".into());
                set_number(&obj, "c1x", c1x);
                set_number(&obj, "c1y", c1y);
                set_number(&obj, "c2x", c2x);
                set_number(&obj, "c2y", c2y);
                set_number(&obj, "x", x);
                set_number(&obj, "y", y);
            }
            PathCommand::Close => {
                set_field(&obj, "type", &"Z".into());
            }
        }
        obj.into()
    }
}

fn commands_to_js(commands: &[PathCommand]) -> Array {
    commands.iter().map(ToJsValue::to_js_value).collect()
}

impl ToJsValue for Edge {
    fn to_js_value(&self) -> JsValue {
        let obj = Object::new();
        set_field(&obj, "commands", &commands_to_js(&self.commands));
        set_field(&obj, "fillStyle0", &optional_style(self.fill_style0));
        set_field(&obj, "fillStyle1", &optional_style(self.fill_style1));
        set_field(&obj, "strokeStyle", &optional_style(self.stroke_style));
        obj.into()
    }
}

impl ToJsValue for Bounds {
    fn to_js_value(&self) -> JsValue {
        let obj = Object::new();
        set_number(&obj, "minX", self.min_x);
        set_number(&obj, "minY", self.min_y);
        set_number(&obj, "maxX", self.max_x);
        set_number(&obj, "maxY", self.max_y);
        obj.into()
    }
}

impl ToJsValue for MorphValidation {
    fn to_js_value(&self) -> JsValue {
        let obj = Object::new();
        let errors: Array = self.errors.iter().map(|e| JsValue::from_str(e)).collect();
        set_field(&obj, "isValid", &JsValue::from_bool(self.is_valid));
        set_field(&obj, "errors", &errors);
        obj.into()
    }
}

/// Attribute lookup over a plain JS object such as `{ edges: "!0 0|20 0", fillStyle1: 1 }`.
pub struct JsAttributes<'a>(pub &'a Object);

impl<'a> AttributeSource for JsAttributes<'a> {
    fn get_attribute(&self, name: &str) -> Option<String> {
        let value = Reflect::get(self.0, &JsValue::from_str(name)).ok()?;
        value
            .as_string()
            .or_else(|| value.as_f64().map(|n| n.to_string()))
    }
}

fn edges_from_js(records: &Array) -> Vec<Edge> {
    records
        .iter()
        .filter_map(|value| value.dyn_ref::<Object>().map(|obj| parse_edge_with_style_changes(&JsAttributes(obj))))
        .flatten()
        .collect()
}

fn edges_to_js(edges: &[Edge]) -> Array {
    edges.iter().map(ToJsValue::to_js_value).collect()
}

#[wasm_bindgen]
pub fn decode_edges(text: &str, debug: Option<bool>) -> Array {
    commands_to_js(&shape::decode(text, debug))
}

#[wasm_bindgen]
pub fn parse_edge_attributes(attributes: &Object) -> Array {
    edges_to_js(&parse_edge_with_style_changes(&JsAttributes(attributes)))
}

#[wasm_bindgen]
pub fn fix_shape_edges(records: &Array) -> Array {
    let fixed = fix_shape(&Shape::new(edges_from_js(records)));
    edges_to_js(&fixed.edges)
}

#[wasm_bindgen]
pub fn shape_bounds(records: &Array) -> JsValue {
    match calculate_shape_bounds(&edges_from_js(records)) {
        Some(bounds) => bounds.to_js_value(),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen]
pub fn validate_morph_edges(start: &Array, end: &Array) -> JsValue {
    validate_morph_shape(&edges_from_js(start), &edges_from_js(end)).to_js_value()
}

#[wasm_bindgen]
pub fn set_edge_decoder_debug(enabled: bool) {
    shape::options::set_debug(enabled);
}

#[wasm_bindgen]
pub fn set_implicit_move_after_close(enabled: bool) {
    shape::options::set_implicit_move_after_close(enabled);
}

#[wasm_bindgen]
pub fn set_split_edges_on_style_change(enabled: bool) {
    shape::options::set_split_on_style_change(enabled);
}
