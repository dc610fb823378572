pub mod detail_modal;
pub mod filter_bar;
pub mod modal;
pub mod shop_header;
pub mod transfer_modal;
pub mod wagon_card;
pub mod wagon_list;
