pub mod basin_png;
