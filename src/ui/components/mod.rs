pub mod chat_area;
pub mod contact_card;
pub mod faq_list;
pub mod input_bar;
