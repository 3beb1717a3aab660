pub mod instansi_handler;

pub use instansi_handler::{
    __path_create_instansi, __path_delete_instansi, __path_list_instansi,
    __path_list_instansi_options, __path_update_instansi, create_instansi, delete_instansi,
    list_instansi, list_instansi_options, update_instansi,
};
