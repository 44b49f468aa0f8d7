pub mod u508_build_picking_list;
