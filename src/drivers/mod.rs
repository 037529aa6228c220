//! Relay, LED matrix and OLED panel drivers, plus hardware initialisation.

pub mod hw_init;
pub mod led_matrix;
pub mod oled;
pub mod relay;
