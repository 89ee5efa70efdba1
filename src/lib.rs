pub mod js_api;
pub mod shape;
pub mod utils;

use utils::{init_logger, set_panic_hook};
use wasm_bindgen::prelude::*;

pub use shape::{
    decode, decode_with_style_changes, fix_shape, parse_edge, parse_edge_with_style_changes,
    validate_morph_shape, DecoderOptions, Edge, PathCommand, Shape, StyleChange,
};

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_logger();
}
