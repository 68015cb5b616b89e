pub mod penman_monteith;
