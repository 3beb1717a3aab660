pub mod asn_handler;

pub use asn_handler::{
    __path_create_asn, __path_delete_asn, __path_list_asn, __path_list_asn_options,
    __path_update_asn, create_asn, delete_asn, list_asn, list_asn_options, update_asn,
};
