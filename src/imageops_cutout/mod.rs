pub mod apply_alpha_mask;
pub mod binary_map;
pub mod border_color;
pub mod edge_detect;
pub mod heuristic;
pub mod mask_editor;
pub mod raw_image;
pub mod region_grow;
pub mod segment;
