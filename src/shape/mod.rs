/// Shape Edge Module
///
/// Decodes Flash-style edge strings (`!x y|x y[cx cy x y(;...)/`) into path
/// commands, and repairs the resulting edge soup into closed, clockwise fill
/// regions that a renderer can fill directly.

pub mod bounds;
pub mod chains;
pub mod coord;
pub mod decoder;
pub mod edge;
pub mod morph;
pub mod options;
pub mod repair;
pub mod tokenizer;
pub mod types;
pub mod winding;

pub use bounds::{calculate_path_bounds, calculate_shape_bounds, Bounds};
pub use chains::{auto_close_paths, connect_broken_chains};
pub use decoder::{
    decode, decode_with_options, decode_with_style_changes, decode_with_style_changes_and_options,
};
pub use edge::{
    parse_edge, parse_edge_with_options, parse_edge_with_style_changes,
    parse_edge_with_style_changes_and_options, AttributeSource,
};
pub use morph::{validate_morph_shape, MorphValidation};
pub use options::DecoderOptions;
pub use repair::{fix_shape, fix_shape_with_epsilon, remove_duplicate_edges};
pub use types::*;
pub use winding::{area, correct_fill_sides, is_clockwise, reverse};
