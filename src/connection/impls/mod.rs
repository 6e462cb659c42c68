mod simulator;
pub use simulator::{Simulator, SimulatorError};

mod repository;
pub use repository::SimulatedRepository;
