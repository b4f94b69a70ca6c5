mod live;
mod mock;
mod records;
