pub mod render_pass;
