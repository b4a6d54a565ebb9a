mod connectivity;
mod integration;
mod manual;
