pub mod text_view;
