// Infrastructure implementations for scgview.

pub mod figure_render;
pub mod record_loader;
pub mod spring_layout;
