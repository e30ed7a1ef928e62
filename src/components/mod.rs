pub mod scorecard;
