pub mod a025_picking_dictionary;
