pub mod answer;
pub mod assessment;
pub mod company;
pub mod completion;
pub mod responses;
