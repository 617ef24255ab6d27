pub mod distance_map;
