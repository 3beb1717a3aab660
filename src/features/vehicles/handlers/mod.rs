pub mod vehicle_handler;

pub use vehicle_handler::{
    __path_create_vehicle, __path_delete_vehicle, __path_list_vehicles, __path_update_vehicle,
    create_vehicle, delete_vehicle, list_vehicles, update_vehicle,
};
