#![allow(non_snake_case)]

pub mod chart;
pub mod data;
