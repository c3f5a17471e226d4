pub mod live_status;
