pub mod la7;
