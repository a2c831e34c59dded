pub mod manager;
pub mod memory;
pub mod mongo;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryFoodStore;
pub use mongo::MongoFoodStore;
pub use repository::{parse_object_id, DeleteResult, FoodStore, InsertResult, UpdateResult};
