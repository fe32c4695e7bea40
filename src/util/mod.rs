pub mod op_log;
