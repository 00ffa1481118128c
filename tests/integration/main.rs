mod store_operations;
