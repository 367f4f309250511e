pub mod accumulator;
pub mod average_cost;
pub mod gains;
pub mod position_model;

pub use accumulator::TrnAccumulator;
pub use average_cost::AverageCostCalculator;
pub use gains::GainsCalculator;
pub use position_model::{
    MoneyValues, Position, PositionStatus, Positions, QuantityValues,
};
