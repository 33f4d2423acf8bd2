pub mod week_plan;
