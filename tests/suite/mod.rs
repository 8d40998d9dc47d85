mod binary;
mod page_flow;
