pub mod toys;
