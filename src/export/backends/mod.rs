mod outline;
mod world;

pub use outline::OutlineBackend;
pub use world::WorldBackend;
