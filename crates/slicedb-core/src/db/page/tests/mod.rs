mod column_page;
