// Domain layer - Traffic monitoring models and pure logic
pub mod chart;
pub mod focus;
pub mod point;
pub mod series;
pub mod severity;
pub mod view;
