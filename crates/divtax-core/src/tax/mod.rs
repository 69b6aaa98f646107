pub mod comprehensive;
